/// Canvas surface and region fills
pub mod canvas;
/// Crop regions and cropped patches
pub mod patch;
