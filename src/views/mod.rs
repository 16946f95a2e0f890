//! Submodule providing the restricted/compacted model views used by the
//! solution generators and the CFT fixing/pricing machinery:
//! [`Focus`], [`SubModelView`], [`CoreModel`], and [`FullToCoreModel`].

pub mod core_model;
pub mod focus;
pub mod full_to_core;
pub mod sub_model_view;

pub use core_model::CoreModel;
pub use focus::Focus;
pub use full_to_core::{CoreRefresh, FullToCoreModel};
pub use sub_model_view::SubModelView;
