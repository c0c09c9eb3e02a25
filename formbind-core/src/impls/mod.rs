mod map;
mod option;
mod pointer;
mod scalar;
mod vec;

#[cfg(feature = "indexmap")]
mod indexmap;
