/// Raw transform record normalization and placement math.
pub mod resolver;
