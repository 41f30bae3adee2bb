//! Membership shortcuts over warrant writes.
//!
//! Every built-in association (a user's roles, a role's permissions, a
//! tenant's pricing tier, ...) is a warrant with the `member` relation:
//! `<object_type>:<object_id>#member@<subject_type>:<subject_id>`.

use crate::client::{RequestOptions, WarrantClient};
use crate::error::WarrantError;
use crate::types::{ObjectRef, ObjectType, Subject, Warrant};

/// The relation used by every built-in association.
pub const MEMBER: &str = "member";

macro_rules! membership {
    ($(
        $(#[$doc:meta])*
        $assign:ident, $remove:ident:
            $object_type:expr, $object_id:ident <- $subject_type:expr, $subject_id:ident;
    )*) => {
        impl WarrantClient {
            $(
                $(#[$doc])*
                pub async fn $assign(
                    &self,
                    $object_id: &str,
                    $subject_id: &str,
                    options: &RequestOptions,
                ) -> Result<Warrant, WarrantError> {
                    self.assign_member(
                        ObjectRef::new($object_type, $object_id),
                        Subject::new($subject_type, $subject_id),
                        options,
                    )
                    .await
                }

                $(#[$doc])*
                pub async fn $remove(
                    &self,
                    $object_id: &str,
                    $subject_id: &str,
                    options: &RequestOptions,
                ) -> Result<Option<String>, WarrantError> {
                    self.remove_member(
                        ObjectRef::new($object_type, $object_id),
                        Subject::new($subject_type, $subject_id),
                        options,
                    )
                    .await
                }
            )*
        }
    };
}

membership! {
    /// Role membership of a user.
    assign_role_to_user, remove_role_from_user:
        ObjectType::Role, role_id <- ObjectType::User, user_id;
    /// Permission granted directly to a user.
    assign_permission_to_user, remove_permission_from_user:
        ObjectType::Permission, permission_id <- ObjectType::User, user_id;
    /// Permission granted to every member of a role.
    assign_permission_to_role, remove_permission_from_role:
        ObjectType::Permission, permission_id <- ObjectType::Role, role_id;
    /// User membership of a tenant.
    assign_user_to_tenant, remove_user_from_tenant:
        ObjectType::Tenant, tenant_id <- ObjectType::User, user_id;
    /// Pricing tier of a tenant.
    assign_pricing_tier_to_tenant, remove_pricing_tier_from_tenant:
        ObjectType::PricingTier, pricing_tier_id <- ObjectType::Tenant, tenant_id;
    /// Pricing tier of a user.
    assign_pricing_tier_to_user, remove_pricing_tier_from_user:
        ObjectType::PricingTier, pricing_tier_id <- ObjectType::User, user_id;
    /// Feature included in a pricing tier.
    assign_feature_to_pricing_tier, remove_feature_from_pricing_tier:
        ObjectType::Feature, feature_id <- ObjectType::PricingTier, pricing_tier_id;
    /// Feature enabled for a tenant.
    assign_feature_to_tenant, remove_feature_from_tenant:
        ObjectType::Feature, feature_id <- ObjectType::Tenant, tenant_id;
    /// Feature enabled for a user.
    assign_feature_to_user, remove_feature_from_user:
        ObjectType::Feature, feature_id <- ObjectType::User, user_id;
}

impl WarrantClient {
    async fn assign_member(
        &self,
        object: ObjectRef,
        subject: Subject,
        options: &RequestOptions,
    ) -> Result<Warrant, WarrantError> {
        self.create_warrant(&object, MEMBER, &subject, None, options)
            .await
    }

    async fn remove_member(
        &self,
        object: ObjectRef,
        subject: Subject,
        options: &RequestOptions,
    ) -> Result<Option<String>, WarrantError> {
        self.delete_warrant(&object, MEMBER, &subject, None, options)
            .await
    }
}
