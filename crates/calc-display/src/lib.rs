mod buffer;

pub use buffer::DisplayBuffer;
