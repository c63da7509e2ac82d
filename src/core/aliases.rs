pub type TokenList = Vec<String>;
pub type AliasList = Vec<String>;
pub type CompletionList = Vec<String>;
