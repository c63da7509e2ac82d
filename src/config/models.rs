use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::errors::{Error, Result};
use crate::extensions::enums::parse_variant;
use crate::extensions::string::TokenPrefix;

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<()>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "True", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "False", to_string = "False")]
    TextFalse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        let format = parse_variant::<BoolFormat>(s).map_err(|valid| {
            Error::Config(format!(
                "Invalid string value for boolean: '{s}'. Valid values: {valid}"
            ))
        })?;
        Ok(Bool(format == BoolFormat::TextTrue))
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Bool, D::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

/// A value typed as one command-line word (no whitespace, not empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Token {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        let trimmed = value.trim();
        if !trimmed.is_single_token() {
            return Err(Error::Config(format!(
                "'{value}' must be a single word without spaces."
            )));
        }
        Ok(Token(trimmed.to_string()))
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfigItem {
    pub value: Token,
    pub description: String,
}

impl TokenConfigItem {
    fn new(value: &str, description: &str) -> Self {
        Self {
            value: Token(value.to_string()),
            description: description.to_string(),
        }
    }

    pub fn parent_shortcut() -> Self {
        Self::new("..", "Token that returns to the enclosing menu.")
    }

    pub fn exit_command() -> Self {
        Self::new("exit", "Command that ends the session.")
    }
}

impl ConfigItem<Token> for TokenConfigItem {
    fn get_value(&self) -> &Token {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        self.value = Token::try_from(new_value.to_string())?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSuffixConfigItem {
    pub value: String,
    pub description: String,
}

impl Default for PromptSuffixConfigItem {
    fn default() -> Self {
        Self {
            value: "> ".into(),
            description: "Text printed after the current menu prompt.".into(),
        }
    }
}

impl ConfigItem<String> for PromptSuffixConfigItem {
    fn get_value(&self) -> &String {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        self.value = new_value.to_string();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<()> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
