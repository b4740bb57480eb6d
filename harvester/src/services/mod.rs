pub mod harvester;
pub mod writer;
pub mod youtube;
