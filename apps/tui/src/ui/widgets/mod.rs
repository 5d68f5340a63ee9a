pub mod fragment;
pub mod popup;
