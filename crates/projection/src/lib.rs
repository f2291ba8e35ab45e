//! Map projections for the current-field maps.
//!
//! Implements the spherical Lambert Conformal Conic projection from scratch,
//! windowed the way the rendered maps are framed.

pub mod lambert;

pub use lambert::LambertConformal;
