//! Fixed content pools the generator and the simulated peer draw from.

pub const FIRST_NAMES: [&str; 40] = [
    "Alexander", "Dmitry", "Maxim", "Sergey", "Andrey", "Alexey", "Artem", "Ilya", "Kirill", "Mikhail",
    "Anna", "Maria", "Elena", "Olga", "Irina", "Natalia", "Tatiana", "Julia", "Svetlana", "Ekaterina",
    "Victor", "Vladimir", "Evgeny", "Nikolai", "Pavel", "Denis", "Roman", "Igor", "Ivan", "Anton",
    "Daria", "Valeria", "Anastasia", "Veronika", "Alina", "Ksenia", "Polina", "Sofia", "Margarita", "Victoria",
];

pub const LAST_NAMES: [&str; 20] = [
    "Ivanov", "Petrov", "Sidorov", "Smirnov", "Kuznetsov", "Popov", "Vasiliev", "Sokolov", "Mikhailov", "Novikov",
    "Fedorov", "Morozov", "Volkov", "Alekseev", "Lebedev", "Semenov", "Egorov", "Pavlov", "Kozlov", "Stepanov",
];

pub const GROUP_NAMES: [&str; 10] = [
    "Dev team", "Family", "Friends", "University", "Gym", "Book club",
    "Project Alpha", "Designers", "Marketing", "HR",
];

pub const STATUSES: [&str; 6] = [
    "Online", "Busy", "Do not disturb", "At work", "On vacation", "In a meeting",
];

/// Chat list previews, also used as group message bodies.
pub const PREVIEWS: [&str; 15] = [
    "Hi! How are you?",
    "Thanks for the help!",
    "Great, it's a deal",
    "Can we meet tomorrow?",
    "Sent the files",
    "Okay, waiting",
    "See you!",
    "Got it, will do",
    "Thanks for the info",
    "When will it be ready?",
    "Let's call later",
    "Great idea!",
    "I need your help",
    "Everything is fine",
    "Be there soon",
];

/// Bodies of seeded one-to-one messages.
pub const DIRECT_MESSAGES: [&str; 15] = [
    "Hi! How are you?",
    "Great, thanks!",
    "Can we meet tomorrow?",
    "Sure, what time?",
    "Maybe at 3 pm?",
    "Okay, it's a deal",
    "See you!",
    "Thanks for the help",
    "You're welcome",
    "How is the project going?",
    "Everything is on schedule",
    "Great!",
    "I need your help with a task",
    "Of course, how can I help?",
    "I'll send the details later",
];

/// Canned replies of the simulated peer.
pub const PEER_RESPONSES: [&str; 8] = [
    "Sounds great!",
    "Okay, it's a deal",
    "Thanks for the info",
    "Got it, will do",
    "Great, waiting",
    "Agreed!",
    "Let's discuss it later",
    "Interesting idea",
];

pub const AVATARS: [&str; 10] = [
    "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1500648767791-00dcc994a43e?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1506794778202-cad84cf45f1d?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1546961329-78bef0414d7c?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1547425260-76bcadfb4f2c?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1517841905240-472988babdf9?w=100&h=100&fit=crop",
    "https://images.unsplash.com/photo-1488426862026-3ee34a7d66df?w=100&h=100&fit=crop",
];
