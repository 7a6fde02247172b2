use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SECTION_HEADER: Regex = Regex::new(r"^\[\[(.*)\]\]:$").unwrap();
    static ref PASSAGE_HEADER: Regex = Regex::new(r"^\[(.*)\]:$").unwrap();
    static ref CONTINUE: Regex = Regex::new(r"^\+\+\+(.*)$").unwrap();
    static ref SCRIPT: Regex = Regex::new(r"^(\t| {4})(.*)$").unwrap();
}

/// A directive line, the part after the `@` sigil already split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Title(String),
    Start(String),
    Import(String),
    Clear,
    Set(String),
    Unset(String),
    Inc { name: String, amount: String },
    Dec { name: String, amount: String },
    Replace(String),
    /// Starts with `@` but is not a known directive. Still never prose.
    Unknown,
}

/// What a single source line is, decided before anything acts on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    SectionHeader(String),
    PassageHeader(String),
    Continue(String),
    Directive(Directive),
    /// Tab or four-space indented line; holds the line minus the indent.
    Script(String),
    Text,
}

impl Line {
    /// Classifies `raw` in precedence order. Everything but script lines is
    /// matched against the trimmed line.
    pub fn classify(raw: &str) -> Line {
        let trimmed = raw.trim();

        if let Some(captures) = SECTION_HEADER.captures(trimmed) {
            return Line::SectionHeader(captures[1].to_string());
        }
        if let Some(captures) = PASSAGE_HEADER.captures(trimmed) {
            return Line::PassageHeader(captures[1].to_string());
        }
        if let Some(captures) = CONTINUE.captures(trimmed) {
            return Line::Continue(captures[1].to_string());
        }
        if trimmed.starts_with('@') {
            return Line::Directive(Directive::parse(trimmed));
        }
        if let Some(captures) = SCRIPT.captures(raw) {
            return Line::Script(captures[2].to_string());
        }
        Line::Text
    }
}

impl Directive {
    /// Parses a trimmed line starting with `@`.
    pub fn parse(line: &str) -> Directive {
        if line == "@clear" {
            return Directive::Clear;
        }

        let Some((keyword, argument)) = line.split_once(' ') else {
            return Directive::Unknown;
        };
        let argument = argument.to_string();

        match keyword {
            "@title" => Directive::Title(argument),
            "@start" => Directive::Start(argument),
            "@import" => Directive::Import(argument),
            "@set" => Directive::Set(argument),
            "@unset" => Directive::Unset(argument),
            "@inc" => {
                let (name, amount) = split_amount(argument);
                Directive::Inc { name, amount }
            }
            "@dec" => {
                let (name, amount) = split_amount(argument);
                Directive::Dec { name, amount }
            }
            "@replace" => Directive::Replace(argument),
            _ => Directive::Unknown,
        }
    }

    /// The attribute expression this directive adds, if it adds one.
    /// `@replace` is excluded because its text has to be rendered first.
    pub fn attribute(&self) -> Option<String> {
        match self {
            Directive::Set(expression) => Some(expression.clone()),
            Directive::Unset(name) => Some(format!("not {}", name)),
            Directive::Inc { name, amount } => Some(format!("{}+={}", name, amount)),
            Directive::Dec { name, amount } => Some(format!("{}-={}", name, amount)),
            _ => None,
        }
    }
}

/// `score 5` → (`score`, `5`); anything else is all name with an amount of 1.
fn split_amount(argument: String) -> (String, String) {
    if let Some((name, amount)) = argument.rsplit_once(' ') {
        let is_amount = !amount.is_empty() && amount.chars().all(|c| c.is_ascii_digit());
        if is_amount && !name.is_empty() && !name.contains(char::is_whitespace) {
            return (name.to_string(), amount.to_string());
        }
    }
    (argument, "1".to_string())
}
