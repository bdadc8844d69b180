//! Backend endpoint paths, relative to the configured base URL.

pub mod auth {
    pub const SIGNUP: &str = "/auth/signup";
    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
}

/// Seller accounts on the payment processor.
pub mod stripe {
    pub const CREATE_ACCOUNT: &str = "/stripe/connect/create-account";
    pub const ACCOUNT_LINK: &str = "/stripe/connect/account-link";
    pub const ACCOUNT_STATUS: &str = "/stripe/connect/account-status";
    pub const WEBHOOK: &str = "/stripe/webhook";
}

pub mod inventory {
    pub const LIST: &str = "/inventory";
    pub const CREATE: &str = "/inventory";

    pub fn update(id: &str) -> String {
        format!("/inventory/{}", id)
    }

    pub fn delete(id: &str) -> String {
        format!("/inventory/{}", id)
    }

    pub fn publish(id: &str) -> String {
        format!("/inventory/{}/publish", id)
    }

    pub fn unpublish(id: &str) -> String {
        format!("/inventory/{}/unpublish", id)
    }

    pub fn by_slug(slug: &str) -> String {
        format!("/inventory/public/{}", slug)
    }
}

pub mod checkout {
    pub const CREATE_SESSION: &str = "/checkout/create-session";
}

pub mod orders {
    pub const LIST: &str = "/orders";

    pub fn by_id(id: &str) -> String {
        format!("/orders/{}", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templated_paths() {
        assert_eq!(inventory::update("abc"), "/inventory/abc");
        assert_eq!(inventory::publish("abc"), "/inventory/abc/publish");
        assert_eq!(inventory::unpublish("abc"), "/inventory/abc/unpublish");
        assert_eq!(inventory::by_slug("s1"), "/inventory/public/s1");
        assert_eq!(orders::by_id("ORD1"), "/orders/ORD1");
    }
}
