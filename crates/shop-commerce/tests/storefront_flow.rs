//! Browse, fill a cart across restarts, and check out against file storage.

use shop_commerce::catalog::{CatalogLatency, CatalogSource, InMemoryCatalog};
use shop_commerce::checkout::{CheckoutFlow, CheckoutStep, PaymentMethod, ShippingAddress};
use shop_commerce::search::{PriceBucket, SearchQuery, SortOption};
use shop_commerce::cart::CartStore;
use shop_commerce::ProductId;
use shop_storage::FileStorage;

fn catalog() -> InMemoryCatalog {
    InMemoryCatalog::seeded().with_latency(CatalogLatency::none())
}

fn address() -> ShippingAddress {
    ShippingAddress {
        first_name: "Alex".into(),
        last_name: "Rivera".into(),
        address: "12 Harbor Road".into(),
        city: "Portland".into(),
        state: "OR".into(),
        zip_code: "97201".into(),
        phone: "5035550199".into(),
        email: "alex@example.com".into(),
        ..ShippingAddress::default()
    }
}

fn card() -> PaymentMethod {
    PaymentMethod {
        card_number: "4000056655665556".into(),
        name_on_card: "Alex Rivera".into(),
        expiry_date: "09/29".into(),
        cvv: "321".into(),
        ..PaymentMethod::default()
    }
}

#[tokio::test]
async fn browse_fill_restart_and_check_out() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = catalog();

    let featured = catalog.list_featured().await.unwrap();
    let ids: Vec<&str> = featured.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "5", "8"]);

    let lamp = catalog.get_product(&ProductId::new("1")).await.unwrap().unwrap();
    let chair = catalog.get_product(&ProductId::new("2")).await.unwrap().unwrap();

    {
        let mut cart = CartStore::open(FileStorage::open(dir.path()).unwrap());
        cart.add(lamp.clone(), 1);
        cart.add(chair, 2);
        assert_eq!(cart.state().total_price().display(), "$579.97");
    }

    // A new session sees the same cart.
    let mut cart = CartStore::open(FileStorage::open(dir.path()).unwrap());
    assert_eq!(cart.state().total_items(), 3);
    cart.add(lamp, 2);
    assert_eq!(cart.state().total_price().display(), "$739.95");
    cart.set_quantity(&ProductId::new("1"), 0);
    assert_eq!(cart.state().total_price().display(), "$499.98");
    cart.add(catalog.get_product(&ProductId::new("1")).await.unwrap().unwrap(), 1);

    let mut flow = CheckoutFlow::new();
    flow.submit_shipping(address()).unwrap();
    flow.submit_payment(card()).unwrap();
    assert_eq!(flow.step(), CheckoutStep::Review);

    let summary = flow.summary(cart.state()).unwrap();
    assert_eq!(summary.total.display(), "$636.37");

    let confirmation = flow.place_order(&mut cart).unwrap();
    assert_eq!(confirmation.summary, summary);
    assert_eq!(confirmation.payment, "Card ending in 5556");
    assert!(cart.state().is_empty());

    let reopened = CartStore::open(FileStorage::open(dir.path()).unwrap());
    assert!(reopened.state().is_empty());
}

#[tokio::test]
async fn listing_filters_over_catalog() {
    let catalog = catalog();
    let products = catalog.list_products().await.unwrap();

    let results = SearchQuery::new()
        .with_filter(PriceBucket::From50To100)
        .with_sort(SortOption::PriceAsc)
        .apply(&products);
    let prices: Vec<String> = results.items.iter().map(|p| p.price.display()).collect();
    assert_eq!(prices, vec!["$59.99", "$79.99"]);

    let searched = catalog.search("lumbar").await.unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].id.as_str(), "2");

    let decor = catalog.list_by_category("Home Decor").await.unwrap();
    assert_eq!(decor.len(), 1);
}
