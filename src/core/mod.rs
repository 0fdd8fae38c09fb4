pub mod etl;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod html;
pub mod index;
pub mod pipeline;
pub mod runner;

pub use crate::domain::model::{Dataset, FetchedPage, PlayerIdentity, PlayerRecord};
pub use crate::domain::ports::{ConfigProvider, PageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
