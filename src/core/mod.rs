pub mod aggregate;
pub mod display;
pub mod engine;
pub mod html;
pub mod location;
pub mod ordering;
pub mod page;
pub mod pipeline;
pub mod render_pass;
pub mod selection_store;
pub mod summary;
pub mod tally;

pub use crate::domain::model::{
    AvailabilityAggregation, AvailabilityRecord, Book, BranchSelection, Catalogue, CopyCounting,
    RenderOutput, RenderPass, RenderedBook,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SelectionStore, Storage};
pub use crate::utils::error::Result;
