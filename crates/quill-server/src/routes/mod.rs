// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod health;
pub mod home;
pub mod openapi;
pub mod pages;
pub mod posts;
pub mod search;
pub mod tags;
