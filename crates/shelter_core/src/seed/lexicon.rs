//! Word lists the seed generator draws from.

pub const NEUTRAL_FIRST_NAMES: &[&str] = &[
    "Alex", "Avery", "Bailey", "Blake", "Casey", "Charlie", "Dakota", "Drew", "Eden", "Emerson",
    "Finley", "Frankie", "Harley", "Hayden", "Jamie", "Jesse", "Jordan", "Kai", "Kendall",
    "Logan", "Marley", "Morgan", "Parker", "Peyton", "Quinn", "Reese", "Riley", "River", "Rowan",
    "Sage", "Sam", "Skyler", "Taylor", "Toby", "Winter",
];

pub const DOG_BREEDS: &[&str] = &[
    "Beagle",
    "Border Collie",
    "Boxer",
    "Bulldog",
    "Cocker Spaniel",
    "Dachshund",
    "Dalmatian",
    "German Shepherd",
    "Golden Retriever",
    "Great Dane",
    "Greyhound",
    "Husky",
    "Labrador Retriever",
    "Poodle",
    "Pug",
    "Rottweiler",
    "Shiba Inu",
    "Whippet",
];

pub const CAT_BREEDS: &[&str] = &[
    "Abyssinian",
    "Bengal",
    "Birman",
    "British Shorthair",
    "Burmese",
    "Chartreux",
    "Devon Rex",
    "Maine Coon",
    "Manx",
    "Norwegian Forest Cat",
    "Persian",
    "Ragdoll",
    "Russian Blue",
    "Scottish Fold",
    "Siamese",
    "Sphynx",
    "Tonkinese",
];

pub const COLORS: &[&str] = &[
    "black", "brown", "cream", "fawn", "gold", "gray", "ivory", "orange", "red", "silver", "tan",
    "white",
];

pub const DOG_AGES: &[&str] = &["puppy", "young", "adult", "senior"];

pub const DOG_COAT_LENGTHS: &[&str] = &["hairless", "short", "medium", "long", "wire", "curly"];

pub const DOG_SIZES: &[&str] = &["small", "medium", "large", "extra large"];

pub const CAT_AGE_KITTEN: &str = "kitten";
pub const CAT_AGE_ADULT: &str = "full grown cat";
pub const CAT_SIZE: &str = "small";
