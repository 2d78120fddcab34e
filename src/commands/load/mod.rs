mod run;
mod sources;

pub use run::run;
