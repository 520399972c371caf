#[cfg(test)]
mod tests;

pub mod error;
pub mod frequency;
pub mod hyperparams;
pub mod knn;
pub mod param_guard;
pub mod ranked;
pub mod traits;
