// Adapters layer: concrete implementations of the domain ports.

#[cfg(feature = "decoder")]
pub mod camera;
#[cfg(feature = "decoder")]
pub mod decoder;
pub mod storage;

#[cfg(feature = "decoder")]
pub use camera::FrameDirCamera;
#[cfg(feature = "decoder")]
pub use decoder::RqrrDecoder;
pub use storage::LocalImageStore;
