//! Static site content: feature highlights, courses and internships.

/// Number of internships shown before "View all" is toggled.
pub const FEATURED_INTERNSHIPS: usize = 3;

/// External application form behind every "Apply" button.
pub const APPLY_FORM_URL: &str = "https://forms.gle/kkKckut2FigwpBWF7";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listing {
    Features,
    Courses,
    Internships,
}

impl Listing {
    pub fn title(self) -> &'static str {
        match self {
            Listing::Features => "Why Choose Nexora",
            Listing::Courses => "Expand Your Knowledge with Our Courses",
            Listing::Internships => "Featured Internships",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct Course {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub level: &'static str,
    pub rating: f32,
    pub students: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkMode {
    Remote,
    Hybrid,
    OnSite,
}

impl WorkMode {
    pub fn label(self) -> &'static str {
        match self {
            WorkMode::Remote => "Remote",
            WorkMode::Hybrid => "Hybrid",
            WorkMode::OnSite => "On-site",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Internship {
    pub id: u32,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub duration: &'static str,
    pub mode: WorkMode,
    pub tags: [&'static str; 3],
}

/// A card as the page renders it, independent of the listing kind.
#[derive(Debug, Clone, PartialEq)]
pub struct CardContent {
    pub id: u32,
    pub title: String,
    pub body: String,
    pub meta: String,
}

pub const FEATURES: [Feature; 6] = [
    Feature {
        id: 1,
        title: "Curated Internships",
        description: "Handpicked internship opportunities from top companies across various \
                      industries.",
    },
    Feature {
        id: 2,
        title: "Skill-Building Courses",
        description: "Industry-relevant courses designed by experts to enhance your employability.",
    },
    Feature {
        id: 3,
        title: "Academic Journals",
        description: "Access to cutting-edge research publications to stay updated with the \
                      latest developments.",
    },
    Feature {
        id: 4,
        title: "Networking Opportunities",
        description: "Connect with professionals, mentors, and peers to build your \
                      professional network.",
    },
    Feature {
        id: 5,
        title: "Global Exposure",
        description: "Opportunities from around the world, broadening your horizons and \
                      experiences.",
    },
    Feature {
        id: 6,
        title: "Career Guidance",
        description: "Expert advice and resources to help you make informed career decisions.",
    },
];

pub const COURSES: [Course; 4] = [
    Course {
        id: 1,
        title: "Advanced Web Development",
        description: "Master modern web technologies including React, Node.js, and \
                      responsive design patterns.",
        duration: "8 weeks",
        level: "Intermediate",
        rating: 4.8,
        students: 3245,
    },
    Course {
        id: 2,
        title: "Data Science Fundamentals",
        description: "Learn statistical methods, data visualization, and machine learning \
                      algorithms.",
        duration: "10 weeks",
        level: "Beginner",
        rating: 4.7,
        students: 5120,
    },
    Course {
        id: 3,
        title: "UI/UX Design Principles",
        description: "Create intuitive user interfaces and seamless experiences with proven \
                      design methodologies.",
        duration: "6 weeks",
        level: "All levels",
        rating: 4.9,
        students: 2786,
    },
    Course {
        id: 4,
        title: "Artificial Intelligence Ethics",
        description: "Explore the ethical implications and challenges in AI development and \
                      implementation.",
        duration: "4 weeks",
        level: "Advanced",
        rating: 4.6,
        students: 1895,
    },
];

const fn internship(
    id: u32,
    title: &'static str,
    location: &'static str,
    duration: &'static str,
    mode: WorkMode,
    tags: [&'static str; 3],
) -> Internship {
    Internship {
        id,
        title,
        company: "NEXORA",
        location,
        duration,
        mode,
        tags,
    }
}

pub const INTERNSHIPS: [Internship; 11] = [
    internship(
        1,
        "Software Development Intern",
        "San Francisco, CA",
        "3 months",
        WorkMode::Remote,
        ["React", "JavaScript", "UI/UX"],
    ),
    internship(
        2,
        "Data Science Intern",
        "New York, NY",
        "6 months",
        WorkMode::Hybrid,
        ["Python", "Machine Learning", "Statistics"],
    ),
    internship(
        3,
        "UX/UI Design Intern",
        "Austin, TX",
        "4 months",
        WorkMode::OnSite,
        ["Figma", "User Research", "Prototyping"],
    ),
    internship(
        4,
        "Full Stack Development Intern",
        "Chicago, IL",
        "6 months",
        WorkMode::Remote,
        ["MERN Stack", "GraphQL", "Docker"],
    ),
    internship(
        5,
        "Frontend Development Intern",
        "Los Angeles, CA",
        "3 months",
        WorkMode::Hybrid,
        ["React", "TypeScript", "Tailwind CSS"],
    ),
    internship(
        6,
        "Machine Learning Intern",
        "Boston, MA",
        "4 months",
        WorkMode::OnSite,
        ["Python", "PyTorch", "TensorFlow"],
    ),
    internship(
        7,
        "Artificial Intelligence Intern",
        "Seattle, WA",
        "6 months",
        WorkMode::Remote,
        ["Deep Learning", "NLP", "Computer Vision"],
    ),
    internship(
        8,
        "Generative AI Intern",
        "Denver, CO",
        "3 months",
        WorkMode::Hybrid,
        ["GANs", "Diffusion Models", "LLMs"],
    ),
    internship(
        9,
        "DevOps Intern",
        "Portland, OR",
        "4 months",
        WorkMode::Remote,
        ["AWS", "CI/CD", "Kubernetes"],
    ),
    internship(
        10,
        "Deep Learning Intern",
        "Miami, FL",
        "6 months",
        WorkMode::OnSite,
        ["CNN", "RNN", "Transformers"],
    ),
    internship(
        11,
        "Django Development Intern",
        "Atlanta, GA",
        "3 months",
        WorkMode::Hybrid,
        ["Python", "Django", "PostgreSQL"],
    ),
];

/// Internships currently listed: the featured few, or all of them.
pub fn internships(show_all: bool) -> &'static [Internship] {
    if show_all {
        &INTERNSHIPS
    } else {
        &INTERNSHIPS[..FEATURED_INTERNSHIPS]
    }
}

/// Cards for a listing, in display order.
pub fn cards(listing: Listing, show_all: bool) -> Vec<CardContent> {
    match listing {
        Listing::Features => FEATURES
            .iter()
            .map(|f| CardContent {
                id: f.id,
                title: f.title.to_string(),
                body: f.description.to_string(),
                meta: String::new(),
            })
            .collect(),
        Listing::Courses => COURSES
            .iter()
            .map(|c| CardContent {
                id: c.id,
                title: c.title.to_string(),
                body: c.description.to_string(),
                meta: format!(
                    "{} · {} · {:.1} ({} students)",
                    c.duration, c.level, c.rating, c.students
                ),
            })
            .collect(),
        Listing::Internships => internships(show_all)
            .iter()
            .map(|i| CardContent {
                id: i.id,
                title: i.title.to_string(),
                body: format!("{} · {} · {}", i.company, i.location, i.mode.label()),
                meta: format!("{} · {}", i.duration, i.tags.join(", ")),
            })
            .collect(),
    }
}
