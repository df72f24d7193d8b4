//! # Product Client
//!
//! Wraps a `ResourceClient<Product>` and adds the catalog lookups used by the
//! menu page and the cart.
use crate::model::{Product, RestaurantId};
use crate::product_actor::ProductError;
use tracing::{debug, instrument};

crate::resource_client!(
    /// Client for the Product store.
    ProductClient,
    Product,
    ProductError,
    product
);

impl ProductClient {
    /// Orderable products of one restaurant, by name.
    #[instrument(skip(self))]
    pub async fn menu(&self, restaurant_id: RestaurantId) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        let mut products = self
            .find(move |p| p.restaurant_id == restaurant_id && p.availability)
            .await?;
        products.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductId;
    use resource_actor::mock::MockClient;
    use rust_decimal::Decimal;

    fn product(id: u32, name: &str) -> Product {
        Product {
            id: ProductId(id),
            restaurant_id: RestaurantId(1),
            name: name.to_string(),
            price: Decimal::new(500, 2),
            description: String::new(),
            availability: true,
        }
    }

    #[tokio::test]
    async fn test_menu_is_sorted_by_name() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_list()
            .return_ok(vec![product(1, "Tacos"), product(2, "Arepa"), product(3, "Mole")]);

        let client = ProductClient::new(mock.client());
        let names: Vec<String> = client
            .menu(RestaurantId(1))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();

        assert_eq!(names, vec!["Arepa", "Mole", "Tacos"]);
        mock.verify();
    }
}
