// SPDX-License-Identifier: AGPL-3.0-or-later

//! Row models read from the backing stores.
mod entity;

pub use entity::{MetaRow, OrderRow, PostRow, ReferenceEntity};
