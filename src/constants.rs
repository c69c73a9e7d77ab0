//! Header vocabulary and fixed display data shared across the pipeline.
//! Header keywords are written in normalized form: Latin lower-case and
//! Arabic alef without hamza, because headers are folded the same way
//! before matching.

// Phone-like detail columns. Search step 3 only looks at these.
pub const PHONE_KEYWORDS: &[&str] = &["جوال", "هاتف", "phone", "mobile"];

// Course columns
pub const COURSE_CODE_KEYWORDS: &[&str] = &["رمز المقرر", "كود المقرر", "course code"];
pub const COURSE_NAME_KEYWORDS: &[&str] = &["اسم المقرر", "course name", "course title"];
pub const COURSE_CREDITS_KEYWORDS: &[&str] = &[
    "الوحدات المعتمدة للمقرر",
    "وحدات المقرر",
    "course credits",
    "course units",
];
pub const COURSE_COMPLETED_KEYWORDS: &[&str] = &[
    "مستوفى",
    "حالة المقرر",
    "course completed",
    "course status",
];
pub const COURSE_SEMESTER_KEYWORDS: &[&str] = &["فصل المقرر", "course semester", "course term"];

// Identity columns. The bare words are matched against the whole header only.
pub const ID_KEYWORDS: &[&str] = &[
    "الرقم التدريبي",
    "رقم المتدرب",
    "رقم الطالب",
    "trainee id",
    "training id",
    "student id",
    "trainee number",
    "training number",
];
pub const ID_EXACT: &[&str] = &["id", "الرقم"];
pub const NAME_KEYWORDS: &[&str] = &[
    "اسم المتدرب",
    "اسم الطالب",
    "trainee name",
    "student name",
    "full name",
];
pub const NAME_EXACT: &[&str] = &["name", "الاسم"];

// Generic detail kinds
pub const DEPARTMENT_KEYWORDS: &[&str] = &["قسم", "تخصص", "major", "dept"];
pub const GPA_KEYWORDS: &[&str] = &["معدل", "gpa"];
pub const SEMESTER_KEYWORDS: &[&str] = &["فصل", "semesters"];
pub const CREDITS_KEYWORDS: &[&str] = &["وحدات", "credits"];
pub const STATUS_KEYWORDS: &[&str] = &["حالة", "status"];
pub const ADVISOR_KEYWORDS: &[&str] = &["مرشد", "advisor"];

/// Priority list used to group detail keys for presentation.
pub const CANONICAL_DETAIL_ORDER: &[&str] = &[
    "القسم",
    "التخصص",
    "حالة المتدرب",
    "فصل القبول",
    "عدد الفصول",
    "المرشد الأكاديمي",
    "رقم الهاتف الجوال",
    "المعدل التراكمي",
    "وصف المستوى",
    "عدد المقررات المطلوبة للبرنامج",
    "عدد الوحدات المعتمده للبرنامج",
    "عدد المقررات المنجزه للبرنامج",
    "عدد الوحدات المنجزه للبرنامج",
];

/// Courses whose name carries one of these are flagged as the production project.
pub const PRODUCTION_PROJECT_MARKERS: &[&str] = &["المشروع الإنتاجي", "production project"];

// Completion cells, compared after trimming, whitespace collapsing and lower-casing.
pub const AFFIRMATIVE_TOKENS: &[&str] = &["yes", "true", "نعم", "مستوفي", "مستوفى"];
pub const NEGATIVE_TOKENS: &[&str] = &["no", "false", "لا", "غير مستوفي", "غير مستوفى"];

/// Rendered in place of an unknown completion state or a missing course cell.
pub const PLACEHOLDER: &str = "-";

pub const STORE_PATH_ENV: &str = "TRAINEE_STORE_PATH";
