pub mod engine;
pub use engine::*;
pub mod error;
pub use error::*;
pub mod ledger;
pub use ledger::*;
pub mod run;
pub use run::*;
