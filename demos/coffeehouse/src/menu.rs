//! What the coffeehouse sells.

use shop_core::ProductType;

/// Which conveyor a product arrives on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Category {
    Drinks,
    Food,
}

impl Category {
    /// Conveyors are created in this order, so the index doubles as the
    /// position in `Shop::conveyors()`.
    pub fn line(self) -> usize {
        match self {
            Category::Drinks => 0,
            Category::Food   => 1,
        }
    }
}

pub struct MenuItem {
    pub name:     &'static str,
    pub category: Category,
    pub price:    f64,
}

pub const MENU: &[MenuItem] = &[
    MenuItem { name: "coffee",    category: Category::Drinks, price: 2.50 },
    MenuItem { name: "tea",       category: Category::Drinks, price: 2.00 },
    MenuItem { name: "muffin",    category: Category::Food,   price: 3.00 },
    MenuItem { name: "croissant", category: Category::Food,   price: 2.75 },
];

pub const TITLES: &[&str] = &["regular", "student", "tourist", "critic"];

pub fn lookup(product_type: &ProductType) -> Option<&'static MenuItem> {
    MENU.iter().find(|item| item.name == product_type.as_str())
}
