//! Capability vocabulary for the HandyHub API.
//!
//! Every privileged operation is gated on one named [`Capability`]. A
//! [`PermissionSet`] answers every capability with `true` or `false`; it is
//! assembled once with [`PermissionSet::grant`] and is read-only afterwards.
//!
//! # Example
//!
//! ```ignore
//! use handyhub_core::permissions::{Capability, PermissionSet};
//!
//! const CUSTOMER: PermissionSet = PermissionSet::NONE
//!     .grant(Capability::BrowseServices)
//!     .grant(Capability::BookServices);
//!
//! assert!(CUSTOMER.allows(Capability::BookServices));
//! assert!(!CUSTOMER.allows(Capability::ManageUsers));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Capability {
    #[serde(rename = "canManageCategories")]
    ManageCategories,
    #[serde(rename = "canManageTypes")]
    ManageTypes,
    #[serde(rename = "canManageAllServices")]
    ManageAllServices,
    #[serde(rename = "canManageOwnServices")]
    ManageOwnServices,
    #[serde(rename = "canApproveProviders")]
    ApproveProviders,
    #[serde(rename = "canManageUsers")]
    ManageUsers,
    #[serde(rename = "canViewAllBookings")]
    ViewAllBookings,
    #[serde(rename = "canViewAnalytics")]
    ViewAnalytics,
    #[serde(rename = "canBrowseServices")]
    BrowseServices,
    #[serde(rename = "canBookServices")]
    BookServices,
    #[serde(rename = "canViewOwnBookings")]
    ViewOwnBookings,
    #[serde(rename = "canLeaveReviews")]
    LeaveReviews,
}

impl Capability {
    pub const ALL: [Capability; 12] = [
        Capability::ManageCategories,
        Capability::ManageTypes,
        Capability::ManageAllServices,
        Capability::ManageOwnServices,
        Capability::ApproveProviders,
        Capability::ManageUsers,
        Capability::ViewAllBookings,
        Capability::ViewAnalytics,
        Capability::BrowseServices,
        Capability::BookServices,
        Capability::ViewOwnBookings,
        Capability::LeaveReviews,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageCategories => "canManageCategories",
            Self::ManageTypes => "canManageTypes",
            Self::ManageAllServices => "canManageAllServices",
            Self::ManageOwnServices => "canManageOwnServices",
            Self::ApproveProviders => "canApproveProviders",
            Self::ManageUsers => "canManageUsers",
            Self::ViewAllBookings => "canViewAllBookings",
            Self::ViewAnalytics => "canViewAnalytics",
            Self::BrowseServices => "canBrowseServices",
            Self::BookServices => "canBookServices",
            Self::ViewOwnBookings => "canViewOwnBookings",
            Self::LeaveReviews => "canLeaveReviews",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One boolean per [`Capability`].
///
/// Fields are private: a set can only be widened through the `const`
/// builder, so a table built at startup cannot be edited by request code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    can_manage_categories: bool,
    can_manage_types: bool,
    can_manage_all_services: bool,
    can_manage_own_services: bool,
    can_approve_providers: bool,
    can_manage_users: bool,
    can_view_all_bookings: bool,
    can_view_analytics: bool,
    can_browse_services: bool,
    can_book_services: bool,
    can_view_own_bookings: bool,
    can_leave_reviews: bool,
}

impl PermissionSet {
    pub const NONE: PermissionSet = PermissionSet {
        can_manage_categories: false,
        can_manage_types: false,
        can_manage_all_services: false,
        can_manage_own_services: false,
        can_approve_providers: false,
        can_manage_users: false,
        can_view_all_bookings: false,
        can_view_analytics: false,
        can_browse_services: false,
        can_book_services: false,
        can_view_own_bookings: false,
        can_leave_reviews: false,
    };

    /// Returns a copy of `self` with `capability` set.
    pub const fn grant(mut self, capability: Capability) -> Self {
        match capability {
            Capability::ManageCategories => self.can_manage_categories = true,
            Capability::ManageTypes => self.can_manage_types = true,
            Capability::ManageAllServices => self.can_manage_all_services = true,
            Capability::ManageOwnServices => self.can_manage_own_services = true,
            Capability::ApproveProviders => self.can_approve_providers = true,
            Capability::ManageUsers => self.can_manage_users = true,
            Capability::ViewAllBookings => self.can_view_all_bookings = true,
            Capability::ViewAnalytics => self.can_view_analytics = true,
            Capability::BrowseServices => self.can_browse_services = true,
            Capability::BookServices => self.can_book_services = true,
            Capability::ViewOwnBookings => self.can_view_own_bookings = true,
            Capability::LeaveReviews => self.can_leave_reviews = true,
        }
        self
    }

    pub fn from_capabilities(capabilities: &[Capability]) -> Self {
        capabilities
            .iter()
            .fold(Self::NONE, |set, capability| set.grant(*capability))
    }

    pub const fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCategories => self.can_manage_categories,
            Capability::ManageTypes => self.can_manage_types,
            Capability::ManageAllServices => self.can_manage_all_services,
            Capability::ManageOwnServices => self.can_manage_own_services,
            Capability::ApproveProviders => self.can_approve_providers,
            Capability::ManageUsers => self.can_manage_users,
            Capability::ViewAllBookings => self.can_view_all_bookings,
            Capability::ViewAnalytics => self.can_view_analytics,
            Capability::BrowseServices => self.can_browse_services,
            Capability::BookServices => self.can_book_services,
            Capability::ViewOwnBookings => self.can_view_own_bookings,
            Capability::LeaveReviews => self.can_leave_reviews,
        }
    }

    /// Capabilities set to `true`, in [`Capability::ALL`] order.
    pub fn granted(&self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|capability| self.allows(*capability))
            .collect()
    }
}
