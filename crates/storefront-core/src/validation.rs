//! # Validation Module
//!
//! Input validation for cart operations and the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Cart page form                                               │
//! │  ├── checkout_form_errors() → inline messages per field                │
//! │  └── No request is sent while any field is invalid                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart reducer                                                 │
//! │  └── THIS MODULE: product id / name / price / count preconditions      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Storefront API                                               │
//! │  └── Server-side checkout validation (external contract)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_id, validate_quantity};
//!
//! assert!(validate_product_id(1).is_ok());
//! assert!(validate_product_id(0).is_err());
//! assert!(validate_quantity(5).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartItem, CheckoutFormData, ProductId};
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_PRODUCT_NAME_LEN: usize = 200;
const MAX_CUSTOMER_NAME_LEN: usize = 100;
const MAX_ADDRESS_LEN: usize = 300;
const MIN_PHONE_DIGITS: usize = 10;
const MAX_PHONE_DIGITS: usize = 15;

// =============================================================================
// Cart Preconditions
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must be positive (`0` is the "no product" id the API never issues)
pub fn validate_product_id(id: ProductId) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or blank
/// - At most 200 characters
///
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Product 1").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed MAX_PRICE
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.units() > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE,
        });
    }

    Ok(())
}

/// Validates an item count.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(count: u32) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::MustBePositive {
            field: "count".to_string(),
        });
    }

    if count > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "count".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY as i64,
        });
    }

    Ok(())
}

/// Validates one cart entry against every per-item invariant.
pub fn validate_cart_item(id: ProductId, item: &CartItem) -> ValidationResult<()> {
    validate_product_id(id)?;
    validate_product_name(&item.name)?;
    validate_price(item.price)?;
    validate_quantity(item.count)
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    required_with_max("name", name, MAX_CUSTOMER_NAME_LEN)
}

/// Validates a delivery address.
pub fn validate_address(address: &str) -> ValidationResult<()> {
    required_with_max("address", address, MAX_ADDRESS_LEN)
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - Optional leading `+`, then digits with spaces, dashes or parentheses
/// - 10 to 15 digits in total
///
/// ```rust
/// use storefront_core::validation::validate_phone;
///
/// assert!(validate_phone("+7 (999) 123-45-67").is_ok());
/// assert!(validate_phone("12345").is_err());
/// assert!(validate_phone("call me").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.is_empty() {
        return Err(ValidationError::Required {
            field: "phone".to_string(),
        });
    }

    let body = phone.strip_prefix('+').unwrap_or(phone);
    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, spaces, dashes and parentheses".to_string(),
        });
    }

    let digits = body.chars().filter(char::is_ascii_digit).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: format!(
                "must have between {} and {} digits",
                MIN_PHONE_DIGITS, MAX_PHONE_DIGITS
            ),
        });
    }

    Ok(())
}

/// Collects every field error of a checkout form, in form order.
///
/// An empty vector means the form can be submitted.
pub fn checkout_form_errors(form: &CheckoutFormData) -> Vec<ValidationError> {
    [
        validate_customer_name(&form.name),
        validate_phone(&form.phone),
        validate_address(&form.address),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// Validates a checkout form, returning the first field error.
pub fn validate_checkout_form(form: &CheckoutFormData) -> ValidationResult<()> {
    match checkout_form_errors(form).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn required_with_max(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}
