/// Mean color of image regions with boundary clamping
pub mod averaging;
/// Source-over alpha compositing of tiles onto a canvas
pub mod blend;
/// Mosaic orchestration: background, random tiles and ordered merging
pub mod compositor;
/// Four-corner gradient tile synthesis
pub mod gradient;
