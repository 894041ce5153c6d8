pub mod input_selector;
pub mod payload_builder;

pub use input_selector::{InputSelector, UtxoSelection};
pub use payload_builder::PayloadBuilder;
