/// Layer order and draw plan.
pub mod layers;
/// Transform map selection.
pub mod source;
