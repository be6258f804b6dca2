pub mod area;
pub mod spot;

pub trait ExampleData {
    fn example_data() -> Self;
}
