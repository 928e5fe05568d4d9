pub mod organizations;

pub use organizations::{
    CommentsProjection, OrganizationRepository, OrganizationRepositoryImpl, RankedMembers,
};
