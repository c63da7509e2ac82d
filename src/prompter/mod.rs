pub mod flows;
pub mod models;
#[allow(clippy::module_inception)]
pub mod prompter;
#[cfg(test)]
mod tests;
