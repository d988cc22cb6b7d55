//! Built-in demo catalog: eight products across six categories.

use crate::catalog::{Category, Product};
use crate::money::Money;

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?auto=format&fit=crop&q=80&w=1000")
}

struct Seed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price_cents: i64,
    rating: f32,
    photos: [&'static str; 3],
    category: &'static str,
    featured: bool,
    stock: u32,
}

const PRODUCTS: [Seed; 8] = [
    Seed {
        id: "1",
        name: "Minimalist Desk Lamp",
        description: "A sleek, adjustable desk lamp with touch controls and multiple lighting modes.",
        price_cents: 7999,
        rating: 4.5,
        photos: [
            "photo-1507473885765-e6ed057f782c",
            "photo-1513506003901-1e6a229e2d15",
            "photo-1540932239986-30128078f3c5",
        ],
        category: "lighting",
        featured: true,
        stock: 15,
    },
    Seed {
        id: "2",
        name: "Ergonomic Office Chair",
        description: "Premium office chair with lumbar support, adjustable height, and breathable mesh material.",
        price_cents: 24999,
        rating: 4.8,
        photos: [
            "photo-1505843490701-5c285b5ad731",
            "photo-1580480055273-228ff5388ef8",
            "photo-1582582621959-48d27397dc69",
        ],
        category: "furniture",
        featured: true,
        stock: 8,
    },
    Seed {
        id: "3",
        name: "Wireless Charging Pad",
        description: "Fast-charging wireless pad compatible with all Qi-enabled devices. Sleek, non-slip design.",
        price_cents: 3999,
        rating: 4.2,
        photos: [
            "photo-1510557880182-3d4d3cba35a5",
            "photo-1580519542036-c47de6196ba5",
            "photo-1544866092-1677b00c0c9b",
        ],
        category: "electronics",
        featured: false,
        stock: 20,
    },
    Seed {
        id: "4",
        name: "Premium Notebook Set",
        description: "Set of 3 high-quality notebooks with premium paper. Perfect for journaling or sketching.",
        price_cents: 2499,
        rating: 4.7,
        photos: [
            "photo-1531346878377-a5be20888e57",
            "photo-1544816155-12df9643f363",
            "photo-1598623549417-c0e98949dc44",
        ],
        category: "stationery",
        featured: false,
        stock: 25,
    },
    Seed {
        id: "5",
        name: "Smart Home Speaker",
        description: "Voice-controlled smart speaker with premium sound quality and virtual assistant.",
        price_cents: 12999,
        rating: 4.6,
        photos: [
            "photo-1589492477829-5e65395b66cc",
            "photo-1577174881658-0f30ed549adc",
            "photo-1552253782-50c019f2030c",
        ],
        category: "electronics",
        featured: true,
        stock: 12,
    },
    Seed {
        id: "6",
        name: "Minimalist Wall Clock",
        description: "Elegant wall clock with a clean, modern design. Silent movement and easy installation.",
        price_cents: 4999,
        rating: 4.4,
        photos: [
            "photo-1563861826100-9cb868fdbe1c",
            "photo-1565193298595-2b56dd0d1c01",
            "photo-1680789538493-da6adaad4a03",
        ],
        category: "home_decor",
        featured: false,
        stock: 18,
    },
    Seed {
        id: "7",
        name: "Luxury Pen Set",
        description: "Set of 5 premium ballpoint pens with smooth ink flow and comfortable grip.",
        price_cents: 3299,
        rating: 4.3,
        photos: [
            "photo-1583485088034-697b5bc54ccd",
            "photo-1616627575383-d664861e457d",
            "photo-1606144042614-b2417e99c4e3",
        ],
        category: "stationery",
        featured: false,
        stock: 30,
    },
    Seed {
        id: "8",
        name: "Leather Desk Mat",
        description: "Premium leather desk mat that protects your desk and adds a touch of elegance to your workspace.",
        price_cents: 5999,
        rating: 4.9,
        photos: [
            "photo-1603486002664-a7812a95dc3e",
            "photo-1581541234269-03d5d8576c0e",
            "photo-1564466809058-bf4114d55352",
        ],
        category: "office",
        featured: true,
        stock: 10,
    },
];

const CATEGORIES: [(&str, &str, &str, &str); 6] = [
    ("1", "Electronics", "Smart devices and gadgets for modern living", "photo-1550009158-9ebf69173e03"),
    ("2", "Furniture", "Stylish and functional furniture for home and office", "photo-1555041469-a586c61ea9bc"),
    ("3", "Lighting", "Illuminate your space with our designer lighting collection", "photo-1507473885765-e6ed057f782c"),
    ("4", "Stationery", "Premium writing instruments and paper products", "photo-1531346878377-a5be20888e57"),
    ("5", "Home Decor", "Decorative accents to personalize your living space", "photo-1532372576444-dda954194ad0"),
    ("6", "Office", "Everything you need for a productive workspace", "photo-1497215842964-222b430dc094"),
];

/// The demo products, in catalog order.
pub fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|s| {
            let product = Product::new(s.id, s.name, Money::usd(s.price_cents))
                .with_description(s.description)
                .with_rating(s.rating)
                .with_images(s.photos.iter().map(|p| unsplash(p)))
                .with_category(s.category)
                .with_stock(s.stock);
            if s.featured {
                product.featured()
            } else {
                product
            }
        })
        .collect()
}

/// The demo categories, in catalog order.
pub fn categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(id, name, description, photo)| {
            Category::new(*id, *name, *description).with_image(unsplash(photo))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_product_has_a_known_category() {
        let slugs: Vec<String> = categories().iter().map(Category::slug).collect();
        for product in products() {
            assert!(
                slugs.contains(&product.category),
                "{} has unknown category {}",
                product.name,
                product.category
            );
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let products = products();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }
}
