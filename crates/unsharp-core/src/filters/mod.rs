pub mod box_blur;
pub mod composite;
pub mod normalize;
pub mod unsharp_mask;
