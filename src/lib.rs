pub use lucent_internal::*;
