mod common;
mod facets;
