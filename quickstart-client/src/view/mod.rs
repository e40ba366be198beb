/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Participant view: containers, active participant selection and track
//! attachment.

mod bridge;
mod manager;
mod selection;
mod surface;

pub use manager::SessionView;
pub use selection::ActiveSelection;
pub use surface::{MediaSlot, RoomView};
