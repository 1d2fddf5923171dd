//! Demo listings used when the listing source cannot be reached.

use crate::model::{BookInfo, Listing, Seller, SellerProfile};

fn seller(name: &str, rating: f64, course: &str) -> Seller {
    Seller::Profile(SellerProfile {
        name: name.to_string(),
        rating: Some(rating),
        course: Some(course.to_string()),
    })
}

fn book(title: &str, author: &str, cover: &str) -> BookInfo {
    BookInfo {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        cover: Some(cover.to_string()),
    }
}

const CALCULUS_COVER: &str = "https://m.media-amazon.com/images/I/81C5El+-h2L._AC_UF1000,1000_QL80_.jpg";
const PHYSICS_COVER: &str = "https://m.media-amazon.com/images/I/81wgcld4wxL._AC_UF1000,1000_QL80_.jpg";

pub fn demo_listings() -> Vec<Listing> {
    vec![
        Listing::new("1", "Cálculo Vol. 1")
            .with_description("Livro de cálculo diferencial e integral")
            .with_price(45.50)
            .with_condition("like-new")
            .with_kind("sale")
            .with_seller(seller("Maria Silva", 4.8, "Engenharia Civil"))
            .with_book(book("Cálculo Vol. 1", "James Stewart", CALCULUS_COVER))
            .with_photos(vec![CALCULUS_COVER.to_string()]),
        Listing::new("2", "Física para Universitários")
            .with_description("Livro completo de física universitária")
            .with_price(68.90)
            .with_condition("used")
            .with_kind("trade")
            .with_seller(seller("João Santos", 4.5, "Física"))
            .with_book(book("Física para Universitários", "David Halliday", PHYSICS_COVER))
            .with_photos(vec![PHYSICS_COVER.to_string()]),
        Listing::new("3", "Química Geral")
            .with_description("Livro de química geral para cursos universitários")
            .with_price(0.0)
            .with_condition("new")
            .with_kind("donation")
            .with_seller(seller("Ana Oliveira", 4.9, "Química"))
            .with_book(book("Química Geral", "John C. Kotz", CALCULUS_COVER))
            .with_photos(vec![CALCULUS_COVER.to_string()]),
    ]
}
