pub mod answer;
pub mod descriptor;
pub mod envelope;
pub mod input;
pub mod issue;
pub mod option;
pub mod request;
pub mod state;
pub mod view;
