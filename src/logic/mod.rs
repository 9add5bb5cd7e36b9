pub mod image;
pub mod mines;
pub mod seam;

pub use image::Kernel;
pub use seam::Seam;
