pub mod pick;
