use std::collections::VecDeque;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
    pub content: String,
    pub publish_time: String,
    pub username: String,
    #[serde(default)]
    pub user_avatar: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comment_count: Option<u64>,
    #[serde(default)]
    pub collects: Option<u64>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A single comment without its replies. Replies live in [`CommentThread`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(alias = "username")]
    pub author: String,
    pub content: String,
    #[serde(alias = "publishTime")]
    pub create_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
    #[serde(default)]
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub comment: Comment,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Comment tree stored as a flat arena.
///
/// Nodes are laid out breadth first, so a child index is always greater than
/// its parent's and siblings keep their wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentThread {
    nodes: Vec<CommentNode>,
    roots: Vec<usize>,
}

impl CommentThread {
    /// Flattens a JSON array of comments with nested `replies`.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        let top_level: Vec<Value> = serde_json::from_value(value)?;
        let mut thread = Self::default();
        let mut pending: VecDeque<(Value, Option<usize>)> =
            top_level.into_iter().map(|value| (value, None)).collect();

        while let Some((mut value, parent)) = pending.pop_front() {
            let replies = match value.as_object_mut().and_then(|map| map.remove("replies")) {
                Some(Value::Null) | None => Vec::new(),
                Some(replies) => serde_json::from_value::<Vec<Value>>(replies)?,
            };
            let comment: Comment = serde_json::from_value(value)?;
            let index = thread.nodes.len();
            thread.nodes.push(CommentNode {
                comment,
                parent,
                children: Vec::new(),
            });
            match parent {
                Some(parent) => thread.nodes[parent].children.push(index),
                None => thread.roots.push(index),
            }
            pending.extend(replies.into_iter().map(|reply| (reply, Some(index))));
        }
        Ok(thread)
    }

    /// Rebuilds the nested wire shape.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        let mut built: Vec<Option<Value>> = vec![None; self.nodes.len()];
        for index in (0..self.nodes.len()).rev() {
            let node = &self.nodes[index];
            let mut value = serde_json::to_value(&node.comment)?;
            let replies = node
                .children
                .iter()
                .filter_map(|child| built[*child].take())
                .collect();
            if let Value::Object(map) = &mut value {
                map.insert("replies".to_string(), Value::Array(replies));
            }
            built[index] = Some(value);
        }
        Ok(Value::Array(
            self.roots
                .iter()
                .filter_map(|root| built[*root].take())
                .collect(),
        ))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, index: usize) -> Option<&CommentNode> {
        self.nodes.get(index)
    }

    pub fn roots(&self) -> impl Iterator<Item = (usize, &CommentNode)> {
        self.roots.iter().map(|index| (*index, &self.nodes[*index]))
    }

    pub fn replies(&self, index: usize) -> impl Iterator<Item = (usize, &CommentNode)> {
        self.nodes
            .get(index)
            .map(|node| &node.children[..])
            .unwrap_or_default()
            .iter()
            .map(|child| (*child, &self.nodes[*child]))
    }

    /// Zero for top-level comments.
    pub fn depth(&self, index: usize) -> usize {
        let mut depth = 0;
        let mut current = self.nodes.get(index).and_then(|node| node.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
