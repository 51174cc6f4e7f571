//! Seed dataset shown when nothing has been persisted yet.

use chrono::{DateTime, Utc};

use crate::domain::{Comment, Glance, GlanceMedia, User};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// The four seed users, `u1` to `u4`.
pub fn users() -> Vec<User> {
    vec![
        User::new("u1", "Alex Johnson", "alexj", "https://picsum.photos/seed/avatar1/100/100")
            .with_bio("Exploring the world one photo at a time. Tech enthusiast and coffee lover.")
            .with_interests(["Photography", "Technology", "Travel"]),
        User::new("u2", "Brenda Smith", "brendas", "https://picsum.photos/seed/avatar2/100/100")
            .with_bio("Software engineer by day, chef by night. Building things and baking treats.")
            .with_interests(["Cooking", "Coding", "Baking"]),
        User::new("u3", "Charlie Brown", "charlieb", "https://picsum.photos/seed/avatar3/100/100")
            .with_bio("Nature is my therapy. Hiking, camping, and the next adventure.")
            .with_interests(["Hiking", "Nature", "Adventure"]),
        User::new("u4", "Diana Prince", "dianap", "https://picsum.photos/seed/avatar4/100/100")
            .with_bio("Art, history, and mythology. Curator of beautiful things.")
            .with_interests(["Art", "History", "Museums"]),
    ]
}

fn comment(id: &str, author: &User, content: &str, created_at: &str) -> Comment {
    Comment {
        id: id.to_string(),
        author: author.clone(),
        content: content.to_string(),
        created_at: at(created_at),
    }
}

fn glance(
    id: &str,
    author: &User,
    content: &str,
    media: GlanceMedia,
    created_at: &str,
    likes: u64,
    comments: Vec<Comment>,
) -> Glance {
    Glance {
        id: id.to_string(),
        author: author.clone(),
        content: content.to_string(),
        media,
        created_at: at(created_at),
        likes,
        shares: 0,
        comments,
    }
}

fn image(url: &str) -> GlanceMedia {
    GlanceMedia::Image {
        url: url.to_string(),
    }
}

/// The five seed glances, `g1` to `g5`, newest first.
pub fn glances() -> Vec<Glance> {
    let users = users();
    let (alex, brenda, charlie, diana) = (&users[0], &users[1], &users[2], &users[3]);

    vec![
        glance(
            "g1",
            alex,
            "Just captured this sunset over the mountains. The colors were unreal! #nature #photography #sunset",
            image("https://picsum.photos/seed/glance1/600/400"),
            "2023-10-26T12:00:00Z",
            152,
            vec![
                comment("c1", brenda, "Wow, amazing shot!", "2023-10-26T10:00:00Z"),
                comment("c2", charlie, "I wish I was there!", "2023-10-26T10:30:00Z"),
            ],
        ),
        glance(
            "g2",
            brenda,
            "My latest project is finally live! So proud of what the team shipped. #webdev #coding",
            GlanceMedia::Text,
            "2023-10-26T09:00:00Z",
            89,
            vec![comment("c3", alex, "Congrats on the launch!", "2023-10-26T05:00:00Z")],
        ),
        glance(
            "g3",
            charlie,
            "Nothing quite like the quiet at the top of a mountain. 10 miles in, 10 to go! #hiking #adventure",
            image("https://picsum.photos/seed/glance2/600/800"),
            "2023-10-25T14:00:00Z",
            230,
            vec![
                comment("c4", diana, "Looks so peaceful.", "2023-10-25T12:00:00Z"),
                comment("c5", alex, "What trail is this?", "2023-10-25T15:00:00Z"),
                comment(
                    "c6",
                    charlie,
                    "It's the \"Eagle Peak\" trail. Highly recommend!",
                    "2023-10-25T16:00:00Z",
                ),
            ],
        ),
        glance(
            "g4",
            brenda,
            "Perfected my sourdough recipe this weekend. The crust, the crumb... Who wants a slice?",
            image("https://picsum.photos/seed/glance3/800/600"),
            "2023-10-24T19:00:00Z",
            178,
            Vec::new(),
        ),
        glance(
            "g5",
            diana,
            "Visited the new exhibit on ancient civilizations today. A journey back in time!",
            image("https://picsum.photos/seed/glance4/600/600"),
            "2023-10-23T11:00:00Z",
            121,
            vec![comment("c7", alex, "I need to check this out.", "2023-10-23T18:00:00Z")],
        ),
    ]
}
