pub mod batch;
pub mod imaging;

pub use batch::BatchProcessor;
