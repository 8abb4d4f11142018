pub mod category;
pub mod collected_resource;
pub mod friend_link;
pub mod hot_search_item;
pub mod resource_link;

pub use category::Entity as CategoryEntity;
pub use collected_resource::Entity as CollectedResourceEntity;
pub use friend_link::Entity as FriendLinkEntity;
pub use hot_search_item::Entity as HotSearchItemEntity;
pub use resource_link::Entity as ResourceLinkEntity;
