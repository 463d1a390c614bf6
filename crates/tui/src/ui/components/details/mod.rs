mod details_component;

pub use details_component::DetailsComponent;
