//! Application layer for InkSpire.
//!
//! Coordinates the domain (`inkspire-core`) and the generation client
//! (`inkspire-interaction`) into the studio workflow: one use case that
//! produces a batch of designs and one state container that the front end
//! drives.

pub mod generation_usecase;
pub mod studio;

pub use generation_usecase::GenerationUseCase;
pub use studio::Studio;

#[cfg(test)]
mod test_support;
