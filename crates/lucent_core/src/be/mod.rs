//! Backend dispatch: routes each buffer variant to the matching CPU kernel.

pub mod ops;
