mod yuv;

pub use yuv::{luma_chroma_from_rgb_image, rgb_from_luma_chroma_image, ColorSpaceConverter};
