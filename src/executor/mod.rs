mod resolver;
mod run;

pub use run::run;
