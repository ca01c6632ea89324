use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Custom validator rejecting empty and whitespace-only names
fn validate_name_not_blank(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_not_blank"));
    }
    Ok(())
}

/// Custom validator requiring a strictly positive price
fn validate_price_positive(price: &Decimal) -> Result<(), ValidationError> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::new("price_positive"));
    }
    Ok(())
}

/// Custom validator requiring a non-negative price
fn validate_price_non_negative(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price_non_negative"));
    }
    Ok(())
}

/// Product entity - a persisted catalog entry
///
/// The identifier is assigned exactly once, when a repository saves a
/// creation input, and is never reassigned. Prices are decimals so
/// fractional monetary values do not lose precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Product name, unique among live products ignoring case
    pub name: String,
    /// Product price, never negative
    pub price: Decimal,
    /// Optional product description
    pub description: Option<String>,
}

/// Hypermedia link attached to outbound representations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

impl Link {
    /// A link of rel "self" pointing back at the resource itself
    pub fn self_link(href: impl Into<String>) -> Self {
        Self {
            rel: "self".to_string(),
            href: href.into(),
        }
    }
}

/// DTO for creating a new product
///
/// Carries no identifier; the store assigns one on save.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(
        function = "validate_name_not_blank",
        message = "Product name cannot be blank"
    ))]
    pub name: String,
    #[validate(custom(
        function = "validate_price_positive",
        message = "Price must be greater than zero"
    ))]
    pub price: Decimal,
    pub description: Option<String>,
}

/// DTO for updating an existing product
///
/// A supplied field fully replaces the stored value; the identifier is
/// untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(
        function = "validate_name_not_blank",
        message = "Product name can't be blank"
    ))]
    pub name: Option<String>,
    #[validate(custom(
        function = "validate_price_non_negative",
        message = "Price must be positive"
    ))]
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

/// Outbound representation of a product
///
/// The constraints on this shape re-assert the entity invariants on the way
/// out; inbound rules live on [`CreateProduct`] and [`UpdateProduct`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductDto {
    pub id: Uuid,
    #[validate(length(
        min = 2,
        max = 250,
        message = "Name must be between 2 and 250 characters"
    ))]
    pub name: String,
    #[validate(custom(
        function = "validate_price_non_negative",
        message = "Price must be positive"
    ))]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Hypermedia links; appended by handlers, never by the service
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Product {
    /// Build the entity for a creation input, assigning a fresh identifier.
    ///
    /// Called by repository implementations when saving, so that identifier
    /// assignment is the store's act.
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            price: input.price,
            description: input.description,
        }
    }

    /// Apply updates from an UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
    }
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            links: Vec::new(),
        }
    }
}

impl ProductDto {
    /// Attach a self link; used by handlers after the service returns
    pub fn with_self_link(mut self, href: impl Into<String>) -> Self {
        self.links.push(Link::self_link(href));
        self
    }
}
