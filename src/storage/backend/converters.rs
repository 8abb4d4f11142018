use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::models::{
    Category, CloudType, FriendLink, FriendLinkDraft, HotSearchItem, LinkRecord, Resource,
    ResourceLink, ResourceRecord, Tags,
};
use migration::entities::{
    category, collected_resource, friend_link, hot_search_item, resource_link,
};

pub fn model_to_category(model: category::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
        alias: model.alias,
        icon: model.icon,
    }
}

pub fn model_to_hot_term(model: hot_search_item::Model) -> HotSearchItem {
    HotSearchItem {
        id: model.id,
        category_id: model.category_id,
        term: model.term,
        score: model.score,
    }
}

/// tags 解析失败时为空列表
pub fn model_to_resource(model: collected_resource::Model) -> Resource {
    Resource {
        id: model.id,
        tags: Tags::decode(&model.tags),
        unique_id: model.unique_id,
        channel: model.channel,
        title: model.title,
        description: model.description,
        original_content: model.original_content,
        image_url: model.image_url,
        category: model.category,
        quality: model.quality,
        year: model.year,
        views: model.views.max(0),
        status: model.status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

pub fn model_to_resource_link(model: resource_link::Model) -> ResourceLink {
    ResourceLink {
        id: model.id,
        resource_id: model.resource_id,
        cloud_type: model.cloud_type,
        url: model.url,
        password: model.password,
        note: model.note,
        source: model.source,
        status: model.status,
        created_at: model.created_at,
    }
}

pub fn model_to_friend_link(model: friend_link::Model) -> FriendLink {
    FriendLink {
        id: model.id,
        name: model.name,
        url: model.url,
        icon: model.icon,
        description: model.description,
        category: model.category,
        sort: model.sort,
        status: model.status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

/// 资源记录 → ActiveModel
///
/// 新建时写入 created_at/views；更新时保留已有的浏览量和时间戳。
pub fn record_to_active_model(
    record: &ResourceRecord,
    existing_id: Option<i64>,
    now: DateTime<Utc>,
) -> collected_resource::ActiveModel {
    let is_new = existing_id.is_none();
    collected_resource::ActiveModel {
        id: existing_id.map(Set).unwrap_or(NotSet),
        unique_id: Set(record.unique_id.clone()),
        channel: Set(record.channel.clone()),
        title: Set(record.title.clone()),
        description: Set(record.description.clone()),
        original_content: Set(record.original_content.clone()),
        tags: Set(Tags(record.tags.clone()).encode()),
        image_url: Set(record.image_url.clone()),
        category: Set(record.category.clone()),
        quality: Set(record.quality.clone()),
        year: Set(record.year),
        views: if is_new { Set(0) } else { NotSet },
        status: Set(1),
        created_at: if is_new {
            Set(record.datetime.unwrap_or(now))
        } else {
            NotSet
        },
        updated_at: if is_new { Set(None) } else { NotSet },
    }
}

/// 链接记录 → ActiveModel，网盘类型统一成规范名
pub fn link_record_to_active_model(
    resource_id: i64,
    link: &LinkRecord,
    now: DateTime<Utc>,
) -> resource_link::ActiveModel {
    resource_link::ActiveModel {
        id: NotSet,
        resource_id: Set(resource_id),
        cloud_type: Set(CloudType::parse_lenient(&link.cloud_type).as_str().to_string()),
        url: Set(link.url.trim().to_string()),
        password: Set(link.password.clone()),
        note: Set(link.note.clone()),
        source: Set(link.source.clone()),
        status: Set(1),
        created_at: Set(now),
    }
}

pub fn draft_to_active_model(
    draft: &FriendLinkDraft,
    existing_id: Option<i64>,
    now: DateTime<Utc>,
) -> friend_link::ActiveModel {
    friend_link::ActiveModel {
        id: existing_id.map(Set).unwrap_or(NotSet),
        name: Set(draft.name.clone()),
        url: Set(draft.url.clone()),
        icon: Set(draft.icon.clone()),
        description: Set(draft.description.clone()),
        category: Set(draft.category.clone()),
        sort: Set(draft.sort),
        status: Set(draft.status),
        created_at: if existing_id.is_none() {
            Set(now)
        } else {
            NotSet
        },
        updated_at: Set(now),
    }
}
