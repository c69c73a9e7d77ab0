// Pipeline processing: header resolution and profile normalization

pub mod normalize;
pub mod resolve;
