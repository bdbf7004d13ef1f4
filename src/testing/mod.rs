mod fake_text_generator;
pub mod store_contract;

pub use fake_text_generator::FakeTextGenerator;
