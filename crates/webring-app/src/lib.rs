// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod derive;
pub mod model;
pub mod resize;
pub mod state;

pub use derive::*;
pub use model::*;
pub use resize::*;
pub use state::*;
