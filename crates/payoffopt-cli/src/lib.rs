mod config;
mod runner;

pub use config::OptimizerConfig;
pub use runner::run;

#[cfg(test)]
mod tests;
