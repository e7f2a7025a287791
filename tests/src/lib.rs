//! Integration tests that drive the whole pipeline through a scripted
//! gateway at the trait seam.

#[cfg(test)]
mod support;

#[cfg(test)]
mod pipeline;
