pub mod selections;
