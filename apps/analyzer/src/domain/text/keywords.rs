use super::value_objects::BusinessType;

const RETAIL_TERMS: &[&str] = &[
    "store", "shop", "market", "boutique", "outlet", "mall", "plaza",
    "sale", "discount", "off", "price", "deal", "offer", "special",
    "open", "closed", "hours", "till", "until", "am", "pm",
    "cash", "card", "payment", "checkout", "register", "receipt",
    "new", "fresh", "organic", "local", "imported", "premium",
    "clothing", "fashion", "apparel", "shoes", "accessories",
    "electronics", "phone", "computer", "tech", "gadget",
];

const RESTAURANT_TERMS: &[&str] = &[
    "cafe", "restaurant", "kitchen", "bakery", "house", "grill",
    "breakfast", "lunch", "dinner", "open", "closed", "hours",
    "menu", "food", "cuisine", "falafel", "alabama", "hills",
    "mediterranean", "shawerma", "delivery", "takeout",
];

const SALON_TERMS: &[&str] = &[
    "salon", "spa", "beauty", "hair", "nails", "massage", "facial",
    "barbershop", "barber", "stylist", "hairdresser", "manicure", "pedicure",
    "cut", "color", "style", "treatment", "wellness", "relax",
    "appointment", "book", "booking", "shampoo", "conditioner",
];

/// Applied on top of the business-specific set for every request.
const GENERAL_TERMS: &[&str] = &[
    "open", "closed", "hours", "welcome", "thank", "visit", "service",
    "quality", "customer", "staff", "manager", "phone", "call",
];

/// Lower-case keywords for one business category. `General` has none of its
/// own.
pub fn business_keywords(business_type: BusinessType) -> &'static [&'static str] {
    match business_type {
        BusinessType::Retail => RETAIL_TERMS,
        BusinessType::Restaurant => RESTAURANT_TERMS,
        BusinessType::Salon => SALON_TERMS,
        BusinessType::General => &[],
    }
}

pub fn general_keywords() -> &'static [&'static str] {
    GENERAL_TERMS
}
